//! Minimal IFC schema knowledge: supertypes and explicit attribute names.
//!
//! Only entities the viewer walks or displays are listed. Attribute
//! positions follow IFC4, with the IFC4X3 facilities and built elements
//! added; the IFC2X3 layouts of the listed entities agree on every
//! position the viewer reads.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct EntityDef {
    pub name: &'static str,
    pub supertype: Option<&'static str>,
    /// Attributes declared by this entity, after those of its supertypes.
    pub attributes: &'static [&'static str],
}

const fn def(
    name: &'static str,
    supertype: Option<&'static str>,
    attributes: &'static [&'static str],
) -> EntityDef {
    EntityDef {
        name,
        supertype,
        attributes,
    }
}

const PREDEFINED: &[&str] = &["PredefinedType"];

static ENTITIES: &[EntityDef] = &[
    // Kernel
    def(
        "IfcRoot",
        None,
        &["GlobalId", "OwnerHistory", "Name", "Description"],
    ),
    def("IfcObjectDefinition", Some("IfcRoot"), &[]),
    def("IfcObject", Some("IfcObjectDefinition"), &["ObjectType"]),
    def(
        "IfcContext",
        Some("IfcObjectDefinition"),
        &[
            "ObjectType",
            "LongName",
            "Phase",
            "RepresentationContexts",
            "UnitsInContext",
        ],
    ),
    def("IfcProject", Some("IfcContext"), &[]),
    def("IfcProjectLibrary", Some("IfcContext"), &[]),
    def(
        "IfcProduct",
        Some("IfcObject"),
        &["ObjectPlacement", "Representation"],
    ),
    // Spatial structure
    def("IfcSpatialElement", Some("IfcProduct"), &["LongName"]),
    def(
        "IfcSpatialStructureElement",
        Some("IfcSpatialElement"),
        &["CompositionType"],
    ),
    def(
        "IfcSite",
        Some("IfcSpatialStructureElement"),
        &[
            "RefLatitude",
            "RefLongitude",
            "RefElevation",
            "LandTitleNumber",
            "SiteAddress",
        ],
    ),
    def(
        "IfcBuilding",
        Some("IfcSpatialStructureElement"),
        &[
            "ElevationOfRefHeight",
            "ElevationOfTerrain",
            "BuildingAddress",
        ],
    ),
    def(
        "IfcBuildingStorey",
        Some("IfcSpatialStructureElement"),
        &["Elevation"],
    ),
    def(
        "IfcSpace",
        Some("IfcSpatialStructureElement"),
        &["PredefinedType", "ElevationWithFlooring"],
    ),
    // IFC4X3 facilities
    def("IfcFacility", Some("IfcSpatialStructureElement"), &[]),
    def("IfcRoad", Some("IfcFacility"), PREDEFINED),
    def("IfcBridge", Some("IfcFacility"), PREDEFINED),
    def("IfcRailway", Some("IfcFacility"), PREDEFINED),
    def("IfcMarineFacility", Some("IfcFacility"), PREDEFINED),
    def(
        "IfcFacilityPart",
        Some("IfcSpatialStructureElement"),
        &["UsageType"],
    ),
    def("IfcFacilityPartCommon", Some("IfcFacilityPart"), PREDEFINED),
    def("IfcRoadPart", Some("IfcFacilityPart"), PREDEFINED),
    def("IfcBridgePart", Some("IfcFacilityPart"), PREDEFINED),
    def("IfcRailwayPart", Some("IfcFacilityPart"), PREDEFINED),
    def("IfcMarinePart", Some("IfcFacilityPart"), PREDEFINED),
    def(
        "IfcExternalSpatialStructureElement",
        Some("IfcSpatialElement"),
        &[],
    ),
    def(
        "IfcExternalSpatialElement",
        Some("IfcExternalSpatialStructureElement"),
        PREDEFINED,
    ),
    def("IfcSpatialZone", Some("IfcSpatialElement"), PREDEFINED),
    // Elements
    def("IfcElement", Some("IfcProduct"), &["Tag"]),
    def("IfcBuildingElement", Some("IfcElement"), &[]),
    def("IfcBuiltElement", Some("IfcElement"), &[]),
    def("IfcWall", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcWallStandardCase", Some("IfcWall"), &[]),
    def("IfcSlab", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcBeam", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcColumn", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcMember", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcPlate", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcRoof", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcStair", Some("IfcBuildingElement"), PREDEFINED),
    def(
        "IfcStairFlight",
        Some("IfcBuildingElement"),
        &[
            "NumberOfRisers",
            "NumberOfTreads",
            "RiserHeight",
            "TreadLength",
            "PredefinedType",
        ],
    ),
    def("IfcRamp", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcRailing", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcCovering", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcCurtainWall", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcFooting", Some("IfcBuildingElement"), PREDEFINED),
    def(
        "IfcBuildingElementProxy",
        Some("IfcBuildingElement"),
        PREDEFINED,
    ),
    def("IfcShadingDevice", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcChimney", Some("IfcBuildingElement"), PREDEFINED),
    def("IfcCourse", Some("IfcBuiltElement"), PREDEFINED),
    def("IfcPavement", Some("IfcBuiltElement"), PREDEFINED),
    def("IfcKerb", Some("IfcBuiltElement"), PREDEFINED),
    def("IfcRail", Some("IfcBuiltElement"), PREDEFINED),
    def("IfcTrackElement", Some("IfcBuiltElement"), PREDEFINED),
    def("IfcEarthworksElement", Some("IfcBuiltElement"), &[]),
    def(
        "IfcEarthworksFill",
        Some("IfcEarthworksElement"),
        PREDEFINED,
    ),
    def(
        "IfcDoor",
        Some("IfcBuildingElement"),
        &[
            "OverallHeight",
            "OverallWidth",
            "PredefinedType",
            "OperationType",
            "UserDefinedOperationType",
        ],
    ),
    def(
        "IfcWindow",
        Some("IfcBuildingElement"),
        &[
            "OverallHeight",
            "OverallWidth",
            "PredefinedType",
            "PartitioningType",
            "UserDefinedPartitioningType",
        ],
    ),
    def("IfcFeatureElement", Some("IfcElement"), &[]),
    def(
        "IfcFeatureElementSubtraction",
        Some("IfcFeatureElement"),
        &[],
    ),
    def(
        "IfcOpeningElement",
        Some("IfcFeatureElementSubtraction"),
        PREDEFINED,
    ),
    def("IfcFeatureElementAddition", Some("IfcFeatureElement"), &[]),
    def(
        "IfcProjectionElement",
        Some("IfcFeatureElementAddition"),
        PREDEFINED,
    ),
    def("IfcFurnishingElement", Some("IfcElement"), &[]),
    def("IfcFurniture", Some("IfcFurnishingElement"), PREDEFINED),
    def(
        "IfcSystemFurnitureElement",
        Some("IfcFurnishingElement"),
        PREDEFINED,
    ),
    def(
        "IfcElementAssembly",
        Some("IfcElement"),
        &["AssemblyPlace", "PredefinedType"],
    ),
    def("IfcElementComponent", Some("IfcElement"), &[]),
    def(
        "IfcBuildingElementPart",
        Some("IfcElementComponent"),
        PREDEFINED,
    ),
    def(
        "IfcDiscreteAccessory",
        Some("IfcElementComponent"),
        PREDEFINED,
    ),
    def("IfcFastener", Some("IfcElementComponent"), PREDEFINED),
    def("IfcTransportElement", Some("IfcElement"), PREDEFINED),
    def("IfcGeographicElement", Some("IfcElement"), PREDEFINED),
    def("IfcCivilElement", Some("IfcElement"), &[]),
    def("IfcVirtualElement", Some("IfcElement"), &[]),
    // Distribution
    def("IfcDistributionElement", Some("IfcElement"), &[]),
    def(
        "IfcDistributionControlElement",
        Some("IfcDistributionElement"),
        &[],
    ),
    def(
        "IfcSensor",
        Some("IfcDistributionControlElement"),
        PREDEFINED,
    ),
    def(
        "IfcActuator",
        Some("IfcDistributionControlElement"),
        PREDEFINED,
    ),
    def(
        "IfcController",
        Some("IfcDistributionControlElement"),
        PREDEFINED,
    ),
    def(
        "IfcAlarm",
        Some("IfcDistributionControlElement"),
        PREDEFINED,
    ),
    def(
        "IfcFlowInstrument",
        Some("IfcDistributionControlElement"),
        PREDEFINED,
    ),
    def(
        "IfcDistributionFlowElement",
        Some("IfcDistributionElement"),
        &[],
    ),
    def(
        "IfcDistributionChamberElement",
        Some("IfcDistributionFlowElement"),
        PREDEFINED,
    ),
    def("IfcFlowSegment", Some("IfcDistributionFlowElement"), &[]),
    def("IfcPipeSegment", Some("IfcFlowSegment"), PREDEFINED),
    def("IfcDuctSegment", Some("IfcFlowSegment"), PREDEFINED),
    def("IfcCableSegment", Some("IfcFlowSegment"), PREDEFINED),
    def("IfcCableCarrierSegment", Some("IfcFlowSegment"), PREDEFINED),
    def("IfcFlowFitting", Some("IfcDistributionFlowElement"), &[]),
    def("IfcPipeFitting", Some("IfcFlowFitting"), PREDEFINED),
    def("IfcDuctFitting", Some("IfcFlowFitting"), PREDEFINED),
    def("IfcCableFitting", Some("IfcFlowFitting"), PREDEFINED),
    def("IfcCableCarrierFitting", Some("IfcFlowFitting"), PREDEFINED),
    def("IfcJunctionBox", Some("IfcFlowFitting"), PREDEFINED),
    def("IfcFlowController", Some("IfcDistributionFlowElement"), &[]),
    def("IfcValve", Some("IfcFlowController"), PREDEFINED),
    def("IfcDamper", Some("IfcFlowController"), PREDEFINED),
    def("IfcSwitchingDevice", Some("IfcFlowController"), PREDEFINED),
    def("IfcProtectiveDevice", Some("IfcFlowController"), PREDEFINED),
    def(
        "IfcFlowMovingDevice",
        Some("IfcDistributionFlowElement"),
        &[],
    ),
    def("IfcPump", Some("IfcFlowMovingDevice"), PREDEFINED),
    def("IfcFan", Some("IfcFlowMovingDevice"), PREDEFINED),
    def(
        "IfcFlowStorageDevice",
        Some("IfcDistributionFlowElement"),
        &[],
    ),
    def("IfcTank", Some("IfcFlowStorageDevice"), PREDEFINED),
    def(
        "IfcFlowTreatmentDevice",
        Some("IfcDistributionFlowElement"),
        &[],
    ),
    def("IfcFilter", Some("IfcFlowTreatmentDevice"), PREDEFINED),
    def(
        "IfcEnergyConversionDevice",
        Some("IfcDistributionFlowElement"),
        &[],
    ),
    def("IfcBoiler", Some("IfcEnergyConversionDevice"), PREDEFINED),
    def("IfcChiller", Some("IfcEnergyConversionDevice"), PREDEFINED),
    def("IfcCoil", Some("IfcEnergyConversionDevice"), PREDEFINED),
    def(
        "IfcUnitaryEquipment",
        Some("IfcEnergyConversionDevice"),
        PREDEFINED,
    ),
    def("IfcFlowTerminal", Some("IfcDistributionFlowElement"), &[]),
    def("IfcSanitaryTerminal", Some("IfcFlowTerminal"), PREDEFINED),
    def("IfcAirTerminal", Some("IfcFlowTerminal"), PREDEFINED),
    def("IfcLightFixture", Some("IfcFlowTerminal"), PREDEFINED),
    def("IfcOutlet", Some("IfcFlowTerminal"), PREDEFINED),
    def(
        "IfcFireSuppressionTerminal",
        Some("IfcFlowTerminal"),
        PREDEFINED,
    ),
    // Types
    def(
        "IfcTypeObject",
        Some("IfcObjectDefinition"),
        &["ApplicableOccurrence", "HasPropertySets"],
    ),
    def(
        "IfcTypeProduct",
        Some("IfcTypeObject"),
        &["RepresentationMaps", "Tag"],
    ),
    def("IfcElementType", Some("IfcTypeProduct"), &["ElementType"]),
    def("IfcBuildingElementType", Some("IfcElementType"), &[]),
    def("IfcWallType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcSlabType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcBeamType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcColumnType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcMemberType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcPlateType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcRoofType", Some("IfcBuildingElementType"), PREDEFINED),
    def("IfcStairType", Some("IfcBuildingElementType"), PREDEFINED),
    def(
        "IfcStairFlightType",
        Some("IfcBuildingElementType"),
        PREDEFINED,
    ),
    def("IfcRailingType", Some("IfcBuildingElementType"), PREDEFINED),
    def(
        "IfcCoveringType",
        Some("IfcBuildingElementType"),
        PREDEFINED,
    ),
    def(
        "IfcCurtainWallType",
        Some("IfcBuildingElementType"),
        PREDEFINED,
    ),
    def(
        "IfcBuildingElementProxyType",
        Some("IfcBuildingElementType"),
        PREDEFINED,
    ),
    def(
        "IfcDoorType",
        Some("IfcBuildingElementType"),
        &[
            "PredefinedType",
            "OperationType",
            "ParameterTakesPrecedence",
            "UserDefinedOperationType",
        ],
    ),
    def(
        "IfcWindowType",
        Some("IfcBuildingElementType"),
        &[
            "PredefinedType",
            "PartitioningType",
            "ParameterTakesPrecedence",
            "UserDefinedPartitioningType",
        ],
    ),
    def("IfcFurnishingElementType", Some("IfcElementType"), &[]),
    def(
        "IfcFurnitureType",
        Some("IfcFurnishingElementType"),
        &["AssemblyPlace", "PredefinedType"],
    ),
    def("IfcDistributionElementType", Some("IfcElementType"), &[]),
    def(
        "IfcDistributionFlowElementType",
        Some("IfcDistributionElementType"),
        &[],
    ),
    def(
        "IfcFlowTerminalType",
        Some("IfcDistributionFlowElementType"),
        &[],
    ),
    def(
        "IfcSanitaryTerminalType",
        Some("IfcFlowTerminalType"),
        PREDEFINED,
    ),
    // Property definitions
    def("IfcPropertyDefinition", Some("IfcRoot"), &[]),
    def(
        "IfcPropertySetDefinition",
        Some("IfcPropertyDefinition"),
        &[],
    ),
    def(
        "IfcPropertySet",
        Some("IfcPropertySetDefinition"),
        &["HasProperties"],
    ),
    def("IfcQuantitySet", Some("IfcPropertySetDefinition"), &[]),
    def(
        "IfcElementQuantity",
        Some("IfcQuantitySet"),
        &["MethodOfMeasurement", "Quantities"],
    ),
    // Relationships
    def("IfcRelationship", Some("IfcRoot"), &[]),
    def("IfcRelConnects", Some("IfcRelationship"), &[]),
    def(
        "IfcRelContainedInSpatialStructure",
        Some("IfcRelConnects"),
        &["RelatedElements", "RelatingStructure"],
    ),
    def("IfcRelDecomposes", Some("IfcRelationship"), &[]),
    def(
        "IfcRelAggregates",
        Some("IfcRelDecomposes"),
        &["RelatingObject", "RelatedObjects"],
    ),
    def(
        "IfcRelNests",
        Some("IfcRelDecomposes"),
        &["RelatingObject", "RelatedObjects"],
    ),
    def("IfcRelDefines", Some("IfcRelationship"), &[]),
    def(
        "IfcRelDefinesByType",
        Some("IfcRelDefines"),
        &["RelatedObjects", "RelatingType"],
    ),
    def(
        "IfcRelDefinesByProperties",
        Some("IfcRelDefines"),
        &["RelatedObjects", "RelatingPropertyDefinition"],
    ),
    // Properties
    def("IfcPropertyAbstraction", None, &[]),
    def(
        "IfcProperty",
        Some("IfcPropertyAbstraction"),
        &["Name", "Description"],
    ),
    def("IfcSimpleProperty", Some("IfcProperty"), &[]),
    def(
        "IfcPropertySingleValue",
        Some("IfcSimpleProperty"),
        &["NominalValue", "Unit"],
    ),
    def(
        "IfcPropertyEnumeratedValue",
        Some("IfcSimpleProperty"),
        &["EnumerationValues", "EnumerationReference"],
    ),
    def(
        "IfcPropertyListValue",
        Some("IfcSimpleProperty"),
        &["ListValues", "Unit"],
    ),
    def(
        "IfcPropertyBoundedValue",
        Some("IfcSimpleProperty"),
        &[
            "UpperBoundValue",
            "LowerBoundValue",
            "Unit",
            "SetPointValue",
        ],
    ),
    // Quantities
    def("IfcPhysicalQuantity", None, &["Name", "Description"]),
    def(
        "IfcPhysicalSimpleQuantity",
        Some("IfcPhysicalQuantity"),
        &["Unit"],
    ),
    def(
        "IfcQuantityLength",
        Some("IfcPhysicalSimpleQuantity"),
        &["LengthValue", "Formula"],
    ),
    def(
        "IfcQuantityArea",
        Some("IfcPhysicalSimpleQuantity"),
        &["AreaValue", "Formula"],
    ),
    def(
        "IfcQuantityVolume",
        Some("IfcPhysicalSimpleQuantity"),
        &["VolumeValue", "Formula"],
    ),
    def(
        "IfcQuantityCount",
        Some("IfcPhysicalSimpleQuantity"),
        &["CountValue", "Formula"],
    ),
    def(
        "IfcQuantityWeight",
        Some("IfcPhysicalSimpleQuantity"),
        &["WeightValue", "Formula"],
    ),
    def(
        "IfcQuantityTime",
        Some("IfcPhysicalSimpleQuantity"),
        &["TimeValue", "Formula"],
    ),
    // Units
    def("IfcNamedUnit", None, &["Dimensions", "UnitType"]),
    def("IfcSIUnit", Some("IfcNamedUnit"), &["Prefix", "Name"]),
    def(
        "IfcConversionBasedUnit",
        Some("IfcNamedUnit"),
        &["Name", "ConversionFactor"],
    ),
    def("IfcContextDependentUnit", Some("IfcNamedUnit"), &["Name"]),
    def(
        "IfcOwnerHistory",
        None,
        &[
            "OwningUser",
            "OwningApplication",
            "State",
            "ChangeAction",
            "LastModifiedDate",
            "LastModifyingUser",
            "LastModifyingApplication",
            "CreationDate",
        ],
    ),
];

fn index() -> &'static HashMap<String, &'static EntityDef> {
    static INDEX: OnceLock<HashMap<String, &'static EntityDef>> = OnceLock::new();
    INDEX.get_or_init(|| {
        ENTITIES
            .iter()
            .map(|d| (d.name.to_ascii_uppercase(), d))
            .collect()
    })
}

/// Looks up an entity definition, ignoring case (`IFCWALL` or `IfcWall`).
#[must_use]
pub fn lookup(type_name: &str) -> Option<&'static EntityDef> {
    index().get(&type_name.to_ascii_uppercase()).copied()
}

/// True if `type_name` is `ancestor` or one of its subtypes.
#[must_use]
pub fn is_subtype_of(type_name: &str, ancestor: &str) -> bool {
    let mut current = lookup(type_name);
    while let Some(def) = current {
        if def.name.eq_ignore_ascii_case(ancestor) {
            return true;
        }
        current = def.supertype.and_then(lookup);
    }
    false
}

/// Names of all entity types that are `ancestor` or derive from it.
#[must_use]
pub fn subtypes_of(ancestor: &str) -> Vec<&'static str> {
    ENTITIES
        .iter()
        .filter(|d| is_subtype_of(d.name, ancestor))
        .map(|d| d.name)
        .collect()
}

/// Explicit attribute names in declaration order, supertypes first.
#[must_use]
pub fn attribute_names(type_name: &str) -> Vec<&'static str> {
    let mut chain = Vec::new();
    let mut current = lookup(type_name);
    while let Some(def) = current {
        chain.push(def);
        current = def.supertype.and_then(lookup);
    }
    chain
        .iter()
        .rev()
        .flat_map(|d| d.attributes.iter().copied())
        .collect()
}
