/// A mapping specification with several sections over `DMIDECODE`.
pub const FIELDMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dmidecode_fieldmap version="1">
  <Mapping name="bios">
    <Map>
      <Map keytype="constant" key="Vendor" valuetype="string" value="/dmidecode/BIOSinfo/Vendor"/>
      <Map keytype="constant" key="Version" valuetype="string" value="/dmidecode/BIOSinfo/Version"/>
      <Map keytype="constant" key="RuntimeSize" valuetype="integer" value="/dmidecode/BIOSinfo/RuntimeSize"/>
      <Map keytype="constant" key="ROMsize" valuetype="float" value="/dmidecode/BIOSinfo/ROMsize"/>
      <Map keytype="constant" key="Characteristics" valuetype="dict">
        <Map keytype="string" key="/dmidecode/BIOSinfo/Characteristics/flag/@name"
             valuetype="boolean" value="/dmidecode/BIOSinfo/Characteristics/flag/@enabled"/>
      </Map>
    </Map>
  </Mapping>
  <Mapping name="memory">
    <Map keytype="constant" key="Type" valuetype="constant" value="DMI"/>
    <Map keytype="constant" key="Locators" valuetype="list:string" value="//MemoryDevice/Locator"/>
    <Map keytype="constant" key="Sizes" valuetype="list:integer" value="//MemoryDevice/Size"
         filter="//MemoryDevice/Size/@unit" filtervalue="MB"/>
    <Map keytype="string" key="//MemoryDevice/Locator" valuetype="integer" value="//MemoryDevice/Size"/>
  </Mapping>
  <Mapping name="device">
    <Map keytype="constant" key="Locator" valuetype="string" value="/MemoryDevice/Locator"/>
    <Map keytype="constant" key="Size" valuetype="integer" value="/MemoryDevice/Size"/>
  </Mapping>
</dmidecode_fieldmap>
"#;

pub const DMIDECODE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dmidecode version="2.12">
  <BIOSinfo>
    <Vendor>LENOVO</Vendor>
    <Version>N1EET62W (1.35 )</Version>
    <RuntimeSize unit="KB">128</RuntimeSize>
    <ROMsize unit="MB">16</ROMsize>
    <Characteristics>
      <flag name="pci" enabled="1"/>
      <flag name="pnp" enabled="1"/>
      <flag name="isa" enabled="0"/>
    </Characteristics>
  </BIOSinfo>
  <Memory>
    <MemoryDevice><Locator>ChannelA-DIMM0</Locator><Size unit="MB">8192</Size></MemoryDevice>
    <MemoryDevice><Locator>ChannelB-DIMM0</Locator><Size unit="MB">4096</Size></MemoryDevice>
  </Memory>
</dmidecode>
"#;
